pub mod dkb;
