//! Diesel schema for task persistence.

diesel::table! {
    /// Tasks, each belonging to one task list.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Trimmed task name.
        name -> Text,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Optional deadline.
        due_date -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Completion flag.
        is_completed -> Bool,
        /// Parent task list.
        task_list_id -> Uuid,
    }
}
