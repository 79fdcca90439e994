//! Diesel schema for task list persistence.

diesel::table! {
    /// Task lists with their embedded connection roster.
    task_lists (id) {
        /// Task list identifier.
        id -> Uuid,
        /// Trimmed list name.
        name -> Varchar,
        /// Owning user.
        owner_id -> Uuid,
        /// Connected users in insertion order.
        connected_user_ids -> Array<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Compare-and-swap revision counter.
        revision -> Int8,
    }
}
