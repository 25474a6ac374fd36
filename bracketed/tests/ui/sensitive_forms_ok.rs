use bracketed::{Bracketed, RedactionConfig};

const CARD_MASK: &str = "**** ****";

#[derive(Bracketed)]
pub struct Payment {
    pub amount: u64,
    #[sensitive]
    pub cvv: String,
    #[sensitive("****")]
    pub pan: String,
    // Not a literal, so the default mask applies.
    #[sensitive(CARD_MASK)]
    pub holder: String,
}

fn main() {
    let payment = Payment {
        amount: 12,
        cvv: "123".to_string(),
        pan: "4111111111111111".to_string(),
        holder: "Ada".to_string(),
    };
    let rendered = payment.render_with(&RedactionConfig::default()).unwrap();
    assert_eq!(
        rendered,
        "[Payment: amount = 12, cvv = [REDACTED], pan = ****, holder = [REDACTED]]"
    );
    let _ = CARD_MASK;
}
