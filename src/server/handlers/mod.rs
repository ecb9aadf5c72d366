pub mod chat;
pub mod faqs;
pub mod health;
