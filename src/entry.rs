/// A key and its priority as they appear in a serialized treap.
#[derive(Serialize, Debug)]
#[serde(rename = "Entry")]
pub struct EntryRef<'a, T: 'a> {
    pub key: &'a T,
    pub priority: u32,
}

#[derive(Deserialize, Debug)]
pub struct Entry<T> {
    pub key: T,
    pub priority: u32,
}
