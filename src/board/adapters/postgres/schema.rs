//! Diesel schema for board persistence.

diesel::table! {
    /// Board columns.
    board_columns (id) {
        /// Column identifier.
        id -> Uuid,
        /// Column title.
        #[max_length = 200]
        title -> Varchar,
        /// Display position.
        position -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task cards, each owned by one column.
    board_tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning column; rows are removed with their column.
        column_id -> Uuid,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Priority (`critical`, `medium`, `low`, or `none`).
        #[max_length = 10]
        priority -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(board_tasks -> board_columns (column_id));
diesel::allow_tables_to_appear_in_same_query!(board_columns, board_tasks);
