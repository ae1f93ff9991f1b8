//! Diesel schema for the journal database.
//!
//! Hand-maintained to match the embedded migrations; SQLite rowid primary
//! keys surface as `BigInt`.

diesel::table! {
    users (id) {
        id -> BigInt,
        username -> Text,
        password_hash -> Text,
    }
}

diesel::table! {
    entries (id) {
        id -> BigInt,
        title -> Text,
        content -> Text,
        tags -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
        user_id -> Nullable<BigInt>,
    }
}

diesel::joinable!(entries -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(entries, users);
