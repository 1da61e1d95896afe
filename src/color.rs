/// Palette for category pies. Colors are picked by hashing the category name,
/// so a category keeps its color across renders and runs.
pub const CATEGORY_PALETTE: [&str; 12] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884D8", "#82CA9D", "#A4DE6C", "#D0ED57",
    "#FFC658", "#8DD1E1", "#E57373", "#BA68C8",
];

/// Positional palette of the dashboard expense card.
pub const CARD_PALETTE: [&str; 3] = ["#00CA9F", "#0088FE", "#FFBB26"];

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

pub fn category_color(name: &str) -> String {
    CATEGORY_PALETTE[palette_index(name, CATEGORY_PALETTE.len())].to_string()
}

/// Like [`category_color`] but over a caller-supplied palette.
/// Returns `None` for an empty palette.
pub fn color_from_palette<S: AsRef<str>>(name: &str, palette: &[S]) -> Option<String> {
    if palette.is_empty() {
        return None;
    }
    Some(palette[palette_index(name, palette.len())].as_ref().to_string())
}

pub fn card_palette_color(index: usize) -> &'static str {
    CARD_PALETTE[index % CARD_PALETTE.len()]
}

fn palette_index(name: &str, palette_len: usize) -> usize {
    fnv1a(name.as_bytes()) as usize % palette_len
}

// 32-bit FNV-1a. Stable across platforms and releases, unlike std's hasher.
fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}
