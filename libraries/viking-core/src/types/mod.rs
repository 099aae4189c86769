mod device;
mod diagnostic_point;
mod ids;
mod role;
mod user;

pub use device::{CreateDevice, Device};
pub use diagnostic_point::{CreateDiagnosticPoint, DiagnosticPoint};
pub use ids::{DeviceId, DiagnosticPointId, RoleId, UserId, UserRoleId, WorkOrderId};
pub use role::{CreateRole, Role, UserRole};
pub use user::{NewUser, User, UserType};
