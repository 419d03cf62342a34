// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 chunktable contributors

//! The closed set of scalar types the storage core understands, the
//! type-erased [`AllTypeVariant`] used at operator boundaries, and the
//! dispatcher that maps a runtime type tag to a monomorphized code path.

pub use column_data::ColumnDataType;
pub use data_type::DataType;
pub use dispatch::{with_data_type, TypeVisitor};
pub use ordered_float::{OrderedF64, OrderedFloatError};
pub use variant::AllTypeVariant;

mod column_data;
mod data_type;
mod dispatch;
mod ordered_float;
mod variant;
