use std::marker::PhantomData;

use bracketed::Bracketed;

// `K` is only used by a sensitive field and a private marker, so it needs
// no `Display` impl.
struct OpaqueKey;

#[derive(Bracketed)]
pub struct Tagged<T, K> {
    pub value: Vec<T>,
    #[sensitive]
    pub key: K,
    kind: PhantomData<K>,
}

fn main() {
    let tagged = Tagged {
        value: vec![1, 2],
        key: OpaqueKey,
        kind: PhantomData,
    };
    let _ = &tagged.kind;
    assert_eq!(tagged.to_string(), "[Tagged: value = [1, 2], key = [REDACTED]]");
}
