//! Diesel schema for todo persistence.

diesel::table! {
    /// Todo records.
    todos (id) {
        /// Store-assigned todo identifier.
        id -> Uuid,
        /// Trimmed todo text.
        #[max_length = 200]
        text -> Varchar,
        /// Completion flag.
        completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Display order.
        sort_order -> Int8,
        /// Monotonic insertion sequence used to break order ties.
        inserted_seq -> Int8,
    }
}
