pub mod weather_model;
