//! Tiny TrueType fonts assembled in memory, so shaping can be tested without
//! font files.
//!
//! The font maps `A`, `V`, `f`, `i`, space, and Hebrew alef and bet. It has a
//! legacy `kern` pair for `AV` and a `liga` lookup turning `ffi` into a
//! single glyph. Glyphs have no contours.

pub const UNITS_PER_EM: u16 = 1000;
pub const ASCENDER: i16 = 800;
pub const DESCENDER: i16 = -200;

pub const GLYPH_NOTDEF: u16 = 0;
pub const GLYPH_A: u16 = 1;
pub const GLYPH_V: u16 = 2;
pub const GLYPH_F: u16 = 3;
pub const GLYPH_I: u16 = 4;
pub const GLYPH_FFI: u16 = 5;
pub const GLYPH_SPACE: u16 = 6;
pub const GLYPH_ALEF: u16 = 7;
pub const GLYPH_BET: u16 = 8;

/// Advance widths in design units, indexed by glyph id.
pub const ADVANCES: [u16; 9] = [500, 600, 600, 300, 250, 800, 250, 520, 540];

pub const KERN_AV: i16 = -50;

const CHARS: [(u32, u16); 7] = [
    (0x20, GLYPH_SPACE),
    (0x41, GLYPH_A),
    (0x56, GLYPH_V),
    (0x66, GLYPH_F),
    (0x69, GLYPH_I),
    (0x05D0, GLYPH_ALEF),
    (0x05D1, GLYPH_BET),
];

/// The full test font with TrueType outline tables.
pub fn outline_font() -> Vec<u8> {
    build(true)
}

/// The same font without `glyf` and `loca`, so it has no outlines at all.
pub fn outlineless_font() -> Vec<u8> {
    build(false)
}

/// Unkerned advance of a glyph in points.
pub fn advance_points(glyph: u16, size: f64) -> f64 {
    f64::from(ADVANCES[usize::from(glyph)]) * size / f64::from(UNITS_PER_EM)
}

fn build(with_outlines: bool) -> Vec<u8> {
    let num_glyphs = ADVANCES.len() as u16;

    let mut tables: Vec<([u8; 4], Vec<u8>)> = vec![
        (*b"GSUB", gsub()),
        (*b"cmap", cmap()),
        (*b"head", head()),
        (*b"hhea", hhea(num_glyphs)),
        (*b"hmtx", hmtx()),
        (*b"kern", kern()),
        (*b"maxp", maxp(num_glyphs)),
    ];

    if with_outlines {
        tables.push((*b"glyf", vec![0; 4]));
        tables.push((*b"loca", vec![0; (usize::from(num_glyphs) + 1) * 2]));
    }

    tables.sort_by(|a, b| a.0.cmp(&b.0));
    sfnt(&tables)
}

fn sfnt(tables: &[([u8; 4], Vec<u8>)]) -> Vec<u8> {
    let num_tables = tables.len() as u16;
    let entry_selector = 15 - num_tables.leading_zeros() as u16;
    let search_range = (1u16 << entry_selector) * 16;

    let mut out = Vec::new();
    push_u32(&mut out, 0x0001_0000);
    push_u16(&mut out, num_tables);
    push_u16(&mut out, search_range);
    push_u16(&mut out, entry_selector);
    push_u16(&mut out, num_tables * 16 - search_range);

    let mut offset = 12 + 16 * tables.len();
    for (tag, data) in tables {
        out.extend_from_slice(tag);
        push_u32(&mut out, checksum(data));
        push_u32(&mut out, offset as u32);
        push_u32(&mut out, data.len() as u32);
        offset += padded_len(data.len());
    }

    for (_, data) in tables {
        out.extend_from_slice(data);
        out.resize(out.len() + padded_len(data.len()) - data.len(), 0);
    }

    out
}

fn head() -> Vec<u8> {
    let mut out = Vec::new();
    push_u32(&mut out, 0x0001_0000); // version
    push_u32(&mut out, 0x0001_0000); // font revision
    push_u32(&mut out, 0); // checksum adjustment
    push_u32(&mut out, 0x5F0F_3CF5); // magic
    push_u16(&mut out, 0x000B); // flags
    push_u16(&mut out, UNITS_PER_EM);
    out.extend_from_slice(&[0; 16]); // created, modified
    push_i16(&mut out, 0); // x min
    push_i16(&mut out, DESCENDER);
    push_i16(&mut out, 800); // x max
    push_i16(&mut out, ASCENDER);
    push_u16(&mut out, 0); // mac style
    push_u16(&mut out, 8); // lowest rec ppem
    push_i16(&mut out, 2); // font direction hint
    push_i16(&mut out, 0); // short loca
    push_i16(&mut out, 0); // glyph data format
    debug_assert_eq!(out.len(), 54);
    out
}

fn hhea(num_glyphs: u16) -> Vec<u8> {
    let mut out = Vec::new();
    push_u32(&mut out, 0x0001_0000);
    push_i16(&mut out, ASCENDER);
    push_i16(&mut out, DESCENDER);
    push_i16(&mut out, 0); // line gap
    push_u16(&mut out, 800); // advance width max
    push_i16(&mut out, 0); // min lsb
    push_i16(&mut out, 0); // min rsb
    push_i16(&mut out, 800); // x max extent
    push_i16(&mut out, 1); // caret slope rise
    push_i16(&mut out, 0); // caret slope run
    push_i16(&mut out, 0); // caret offset
    out.extend_from_slice(&[0; 8]); // reserved
    push_i16(&mut out, 0); // metric data format
    push_u16(&mut out, num_glyphs);
    debug_assert_eq!(out.len(), 36);
    out
}

fn maxp(num_glyphs: u16) -> Vec<u8> {
    let mut out = Vec::new();
    push_u32(&mut out, 0x0000_5000);
    push_u16(&mut out, num_glyphs);
    out
}

fn hmtx() -> Vec<u8> {
    let mut out = Vec::new();
    for advance in ADVANCES {
        push_u16(&mut out, advance);
        push_i16(&mut out, 0);
    }
    out
}

// Format 12 subtable for the Windows Unicode full repertoire encoding.
fn cmap() -> Vec<u8> {
    let mut out = Vec::new();
    push_u16(&mut out, 0); // version
    push_u16(&mut out, 1); // number of subtables
    push_u16(&mut out, 3); // platform: windows
    push_u16(&mut out, 10); // encoding: unicode full repertoire
    push_u32(&mut out, 12); // subtable offset

    let groups = CHARS.len() as u32;
    push_u16(&mut out, 12); // format
    push_u16(&mut out, 0); // reserved
    push_u32(&mut out, 16 + groups * 12); // length
    push_u32(&mut out, 0); // language
    push_u32(&mut out, groups);
    for (c, glyph) in CHARS {
        push_u32(&mut out, c);
        push_u32(&mut out, c);
        push_u32(&mut out, glyph.into());
    }
    out
}

// Version 0 kern table with a single horizontal format 0 subtable.
fn kern() -> Vec<u8> {
    let pairs: [(u16, u16, i16); 1] = [(GLYPH_A, GLYPH_V, KERN_AV)];

    let mut out = Vec::new();
    push_u16(&mut out, 0); // version
    push_u16(&mut out, 1); // number of subtables

    push_u16(&mut out, 0); // subtable version
    push_u16(&mut out, (6 + 8 + 6 * pairs.len()) as u16); // length
    push_u16(&mut out, 0x0001); // format 0, horizontal

    push_u16(&mut out, pairs.len() as u16);
    push_u16(&mut out, 6); // search range
    push_u16(&mut out, 0); // entry selector
    push_u16(&mut out, 0); // range shift
    for (left, right, value) in pairs {
        push_u16(&mut out, left);
        push_u16(&mut out, right);
        push_i16(&mut out, value);
    }
    out
}

// A `DFLT` script whose default language system enables one `liga` feature,
// pointing at one ligature substitution lookup: f f i -> ffi.
fn gsub() -> Vec<u8> {
    let mut script_list = Vec::new();
    push_u16(&mut script_list, 1); // script count
    script_list.extend_from_slice(b"DFLT");
    push_u16(&mut script_list, 8); // script offset
    // script table
    push_u16(&mut script_list, 4); // default lang sys offset
    push_u16(&mut script_list, 0); // lang sys count
    // lang sys table
    push_u16(&mut script_list, 0); // lookup order
    push_u16(&mut script_list, 0xFFFF); // no required feature
    push_u16(&mut script_list, 1); // feature index count
    push_u16(&mut script_list, 0);

    let mut feature_list = Vec::new();
    push_u16(&mut feature_list, 1); // feature count
    feature_list.extend_from_slice(b"liga");
    push_u16(&mut feature_list, 8); // feature offset
    // feature table
    push_u16(&mut feature_list, 0); // feature params
    push_u16(&mut feature_list, 1); // lookup index count
    push_u16(&mut feature_list, 0);

    let mut lookup_list = Vec::new();
    push_u16(&mut lookup_list, 1); // lookup count
    push_u16(&mut lookup_list, 4); // lookup offset
    // lookup table
    push_u16(&mut lookup_list, 4); // ligature substitution
    push_u16(&mut lookup_list, 0); // flags
    push_u16(&mut lookup_list, 1); // subtable count
    push_u16(&mut lookup_list, 8); // subtable offset
    // ligature substitution subtable, format 1
    push_u16(&mut lookup_list, 1);
    push_u16(&mut lookup_list, 8); // coverage offset
    push_u16(&mut lookup_list, 1); // ligature set count
    push_u16(&mut lookup_list, 14); // ligature set offset
    // coverage, format 1
    push_u16(&mut lookup_list, 1);
    push_u16(&mut lookup_list, 1); // glyph count
    push_u16(&mut lookup_list, GLYPH_F);
    // ligature set
    push_u16(&mut lookup_list, 1); // ligature count
    push_u16(&mut lookup_list, 4); // ligature offset
    // ligature
    push_u16(&mut lookup_list, GLYPH_FFI);
    push_u16(&mut lookup_list, 3); // component count
    push_u16(&mut lookup_list, GLYPH_F);
    push_u16(&mut lookup_list, GLYPH_I);

    let script_list_offset = 10;
    let feature_list_offset = script_list_offset + script_list.len();
    let lookup_list_offset = feature_list_offset + feature_list.len();

    let mut out = Vec::new();
    push_u16(&mut out, 1); // major version
    push_u16(&mut out, 0); // minor version
    push_u16(&mut out, script_list_offset as u16);
    push_u16(&mut out, feature_list_offset as u16);
    push_u16(&mut out, lookup_list_offset as u16);
    out.extend_from_slice(&script_list);
    out.extend_from_slice(&feature_list);
    out.extend_from_slice(&lookup_list);
    out
}

fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

fn push_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn push_i16(out: &mut Vec<u8>, v: i16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn push_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}
