//! Route modules

pub mod assets;
pub mod books;
pub mod consultants;
pub mod faqs;
pub mod favorites;
pub mod games;
pub mod health;
pub mod seo;
pub mod testimonials;
