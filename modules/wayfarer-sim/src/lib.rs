pub mod decision;
pub mod emotion;
pub mod friction;
pub mod narrate;
pub mod persona;
pub mod run_log;
pub mod runner;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod wait;
