pub mod business_day;
