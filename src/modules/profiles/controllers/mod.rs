pub mod profile_controller;
