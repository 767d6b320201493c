mod arena;
mod handle;
mod level;
mod node;
mod raw_skip_list;

pub(crate) use handle::Handle;
pub(crate) use raw_skip_list::RawSkipList;
