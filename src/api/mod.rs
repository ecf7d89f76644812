pub mod pix_controller;
