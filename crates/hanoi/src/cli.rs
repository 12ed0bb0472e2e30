pub mod play;
pub mod run;
pub mod solve;
