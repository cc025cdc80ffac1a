/*
[INPUT]:  FetchController built from configuration
[OUTPUT]: Non-interactive command modes
[POS]:    CLI layer
[UPDATE]: When adding command modes
*/

mod once;

pub use once::run_once;
