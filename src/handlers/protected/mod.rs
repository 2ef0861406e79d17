pub mod alert;
pub mod ownership;
pub mod sensor;
pub mod sensor_data;
pub mod user;
