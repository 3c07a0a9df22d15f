pub mod audit_logs;
pub mod extensions;
pub mod products;
pub mod transactions;
pub mod users;
pub mod vouchers;

pub use audit_logs::Entity as AuditLogs;
pub use extensions::Entity as Extensions;
pub use products::Entity as Products;
pub use transactions::Entity as Transactions;
pub use users::Entity as Users;
pub use vouchers::Entity as Vouchers;
