pub mod aggregate;
pub mod bulk;
pub mod csv_import;

pub use aggregate::{Product, ProductId, ProductState};
pub use bulk::{
    BulkActionRequest, BulkDeleteRequest, BulkField, BulkInput, BulkUpdatePayload, BulkValue,
    ReferenceEdit, ReferenceMode, StockAdjustment, StockOp,
};
pub use csv_import::{ImportProductsPayload, ImportResult, ParseSkip, ParsedRow};
