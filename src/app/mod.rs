pub mod analysis_worker;
pub mod event_loop;
pub mod state;
