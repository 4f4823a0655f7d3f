pub mod recurring_controller;
