pub mod history;
pub mod run;
pub mod session;
pub mod timer;
