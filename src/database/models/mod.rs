pub mod alert;
pub mod sensor;
pub mod sensor_data;
pub mod user;
