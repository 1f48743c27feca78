pub mod config_cmd;
pub mod kinds;
pub mod run;
