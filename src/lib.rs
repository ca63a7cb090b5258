//! bmi-stylist: BMI from any units, plus generated critique and style advice.
//! Hexagonal layout: domain, ports, use cases, adapters.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
