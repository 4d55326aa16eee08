pub mod codec;
pub mod files;
pub mod storage;

pub use codec::{
    decode_next_id, decode_tasks, encode_tasks, repair_duplicate_ids, NEXT_ID_KEY, TASKS_KEY,
};
pub use files::{create_project_dir, prepare_data_dir, LOG_FILE, STORAGE_FILE};
#[cfg(test)]
pub use storage::MemoryStorage;
pub use storage::{FileStorage, KeyValueStorage, StorageError};
