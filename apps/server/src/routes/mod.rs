mod health;
mod records;

macros_utils::routes! {
    module health,
    module records,
}
