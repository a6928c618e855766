pub mod process_motor_link;
