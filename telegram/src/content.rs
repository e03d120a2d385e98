//! Fixed texts the bot sends.

pub const INTRO: &str = "Hi! I’m Ashad Muneer’s freelancing bot. I help businesses grow with AI automation, chatbots, and smart workflows. Need a stunning website? I create fast, responsive sites that engage users. Looking for better user experience? My UI/UX designs simplify interactions. From automating tasks to building custom solutions, I make your work easier. Let’s create something impactful together!\n\nSelect an option:";
pub const BACK_TO_MENU: &str = "Back to main menu:";
pub const PORTFOLIO: &str =
    "To see my projects and more details about me, visit my portfolio website: https://ashad.info";
pub const CONTACT: &str = "Contact Ashad via email: ashadmuneerofficial@gmail.com, LinkedIn (linkedin.com/in/ashadmuneer), or visit my portfolio: https://ashad.info";

pub const INQUIRY_STARTING: &str = "Starting inquiry...";
pub const INQUIRY_SUBMITTED: &str = "Inquiry submitted! Ashad will contact you soon.";
pub const INQUIRY_SAVE_FAILED: &str = "Error saving inquiry. Please try again later.";
pub const INQUIRY_MISSING: &str = "Error: Inquiry data missing. Please start over with /start.";
pub const INQUIRY_CANCELED: &str = "Inquiry canceled.";

pub const APOLOGY: &str = "Sorry, an error occurred. Try again or contact support.";
pub const UNKNOWN_ACTION: &str = "This button is no longer supported.";

const ACHIEVEMENTS: [&str; 5] = [
    "Winner – First place in Smart India Hackathon (SIH) internal college round (out of 124 teams)",
    "8th Place – Inter-college hackathon at Bennett University (out of 140 teams)",
    "Top 10 Contributor – Script Winter of Code (SWoC)",
    "2nd Position – Tech Pravaah'22 (ABES Engineering College)",
    "Certifications: AWS Academy Cloud Foundations, Postman API Fundamentals, HackerRank Problem Solving, Coursera UX Design, Webflow No-code Website.",
];

pub fn achievements() -> String {
    format!(
        "My Achievements & Certifications:\n\n{list}",
        list = ACHIEVEMENTS.join("\n\n")
    )
}
