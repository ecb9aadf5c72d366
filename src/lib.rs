pub mod core;
pub mod knowledge;
pub mod llm;
pub mod pipeline;
pub mod rag;
pub mod server;
pub mod state;
