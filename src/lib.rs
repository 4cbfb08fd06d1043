pub mod assignments;
pub mod chatbot;
pub mod config;
pub mod courses;
pub mod error;
pub mod grades;
pub mod intent;
pub mod models;
pub mod respond;
pub mod snapshot;
pub mod timeframe;

pub use chatbot::ChatBot;
pub use config::ChatConfig;
pub use grades::GradeSource;
