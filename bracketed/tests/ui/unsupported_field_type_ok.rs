use bracketed::Bracketed;

macro_rules! counter {
    () => {
        u32
    };
}

// Fields whose type cannot be classified are left out of the output.
#[derive(Bracketed)]
pub struct Metrics {
    pub name: String,
    pub hits: counter!(),
}

fn main() {
    let metrics = Metrics {
        name: "api".to_string(),
        hits: 3,
    };
    assert_eq!(metrics.hits, 3);
    assert_eq!(metrics.to_string(), "[Metrics: name = api]");
}
