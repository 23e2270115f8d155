pub mod config_app;
