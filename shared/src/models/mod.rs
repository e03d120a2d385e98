mod inquiry;

pub use inquiry::{Inquiry, InquiryBuilder, InquiryBuilderError, UNKNOWN_USERNAME};
