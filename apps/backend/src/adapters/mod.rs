pub mod sessions_sea;
