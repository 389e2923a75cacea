pub mod states;
pub mod trail;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod controls;
pub mod scenario;
pub mod context;
pub mod run_loop;
