pub mod renderer;
pub mod planetsim_vis2d;
