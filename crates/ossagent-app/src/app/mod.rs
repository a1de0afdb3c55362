pub mod check;
pub mod crew;
pub mod repl;
pub mod setup;
pub mod task;

pub use check::{print_status, run_check};
pub use crew::{run_crew, CrewOptions};
pub use repl::run_repl_mode;
pub use setup::{endpoint_config, setup_from_cli, AppConfig};
pub use task::{run_ask, run_think};
