pub mod wall_clock;
