pub mod customer;
pub mod employee;
pub mod movement;
pub mod order;
pub mod product;

pub use customer::Customer;
pub use customer::CustomerStats;
pub use employee::Employee;
pub use employee::EmployeeStats;
pub use movement::Movement;
pub use movement::MovementStats;
pub use order::Order;
pub use order::OrderItem;
pub use order::OrderStats;
pub use product::Product;
pub use product::ProductStats;
