pub mod summarize;

pub use summarize::SummarizeCommand;
