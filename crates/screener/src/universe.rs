//! Fixed instrument universe of the options market.

/// Underlying symbols tracked by the screener.
///
/// Order matters: option names are matched against this list by substring
/// and the first hit wins, so a shorter symbol listed earlier takes
/// precedence over a longer one that contains it.
pub const TARGET_SYMBOLS: [&str; 38] = [
    "اخابر",
    "آساس",
    "اطلس",
    "امين شهر",
    "اهرم",
    "بساما",
    "پادا",
    "تاصيكو",
    "توان",
    "تيام",
    "جهش",
    "خاور",
    "خبهمن",
    "خساپا",
    "خگستر",
    "خودران",
    "خودرو",
    "ذوب",
    "رويين",
    "سامان",
    "شپنا",
    "شتاب",
    "شستا",
    "طعام",
    "فارس",
    "فرابورس",
    "فزر",
    "فصبا",
    "فملي",
    "فولاد",
    "كاريس",
    "موج",
    "نارنج اهرم",
    "وبصادر",
    "وبملت",
    "وتجارت",
    "وتعاون",
    "وغدير",
];

/// Leading characters of option trading symbols.
pub const OPTION_SYMBOL_PREFIXES: [char; 2] = ['ض', 'ط'];

/// Raw industry-code field values that mark an option row.
pub const OPTION_CODE_FIELDS: [&str; 4] = ["311", "312", "320", "321"];

/// Start of the first name segment of a call contract.
pub const CALL_PREFIX: &str = "اختيارخ";

/// Name fragment of the leveraged fund whose options do not name a target.
pub const LEVERAGED_FUND_MARKER: &str = "نارنج";

/// Symbol assigned to options carrying [`LEVERAGED_FUND_MARKER`].
pub const LEVERAGED_FUND_SYMBOL: &str = "نارنج اهرم";

/// Returns true if `symbol` is exactly one of [`TARGET_SYMBOLS`].
#[must_use]
pub fn is_target_symbol(symbol: &str) -> bool {
    TARGET_SYMBOLS.contains(&symbol)
}
