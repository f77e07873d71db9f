//! Business logic services for the SiteLedger back-office

pub mod absence;
pub mod auth;
pub mod cash;
pub mod employee;
pub mod expense;
pub mod finance;
pub mod invoice;
pub mod item;
pub mod object;
pub mod party;
pub mod payment;
pub mod purchase;
pub mod salary;

pub use absence::AbsenceService;
pub use auth::AuthService;
pub use cash::CashService;
pub use employee::EmployeeService;
pub use expense::ExpenseService;
pub use finance::FinanceService;
pub use invoice::InvoiceService;
pub use item::ItemService;
pub use object::ObjectService;
pub use party::PartyService;
pub use payment::PaymentService;
pub use purchase::PurchaseService;
pub use salary::SalaryService;
