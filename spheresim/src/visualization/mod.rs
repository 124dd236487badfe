pub mod spheresim_vis3d;
