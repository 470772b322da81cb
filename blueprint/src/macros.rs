#[macro_export]
macro_rules! entered_span {
    ($first:expr, $($fields:tt)*) => {
        $crate::tracing_span!($first, $($fields)*).entered()
    };
    ($first:expr $(,)*) => {
        $crate::tracing_span!($first).entered()
    };
}

#[macro_export]
macro_rules! tracing_span {
    ($first:expr, $($fields:tt)*) => {
        tracing::span!(tracing::Level::INFO, $first, $($fields)*)
    };
    ($first:expr $(,)*) => {
        tracing::span!(tracing::Level::INFO, $first)
    };
}

#[macro_export]
macro_rules! exit_span {
    ($first:expr $(,)*) => {
        $first.exit();
    };
}

/// Writes a witness cell of a component layout, propagating table errors.
macro_rules! set_witness {
    ($table:expr, $layout:expr, $column:expr, $row:expr, $value:expr) => {
        $table.try_set(
            expression::ColumnType::Witness,
            $layout.w($column) as usize,
            $row,
            ff_ext::FieldInto::into_f($value),
        )?
    };
}

pub(crate) use set_witness;
