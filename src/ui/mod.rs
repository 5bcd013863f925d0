pub mod output;

pub use output::{print_help, print_welcome, ConsoleObserver, ToolTraceObserver, GOODBYE_MESSAGE};
