//! Unicode to roff glyph escaping.
//!
//! Every key is a single code point, so escaping is one non-overlapping pass
//! over the input. Characters without an entry pass through verbatim.
//! Escaping is not idempotent (the escape syntax itself contains mapped
//! characters like `[`), so a text run must be escaped exactly once.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Unicode code points and their roff escape sequences.
pub const GLYPHS: &[(char, &str)] = &[
    ('Ð', "\\[-D]"),
    ('ð', "\\[Sd]"),
    ('Þ', "\\[TP]"),
    ('þ', "\\[Tp]"),
    ('ß', "\\[ss]"),
    // Ligatures and other Latin glyphs
    ('ﬀ', "\\[ff]"),
    ('ﬁ', "\\[fi]"),
    ('ﬂ', "\\[fl]"),
    ('ﬃ', "\\[Fi]"),
    ('ﬄ', "\\[Fl]"),
    ('Ł', "\\[/L]"),
    ('ł', "\\[/l]"),
    ('Ø', "\\[/O]"),
    ('ø', "\\[/o]"),
    ('Æ', "\\[AE]"),
    ('æ', "\\[ae]"),
    ('Œ', "\\[OE]"),
    ('œ', "\\[oe]"),
    ('Ĳ', "\\[IJ]"),
    ('ĳ', "\\[ij]"),
    ('ı', "\\[.i]"),
    ('ȷ', "\\[.j]"),
    // Accented characters
    ('Á', "\\['A]"),
    ('Ć', "\\['C]"),
    ('É', "\\['E]"),
    ('Í', "\\['I]"),
    ('Ó', "\\['O]"),
    ('Ú', "\\['U]"),
    ('Ý', "\\['Y]"),
    ('á', "\\['a]"),
    ('ć', "\\['c]"),
    ('é', "\\['e]"),
    ('í', "\\['i]"),
    ('ó', "\\['o]"),
    ('ú', "\\['u]"),
    ('ý', "\\['y]"),
    ('Ä', "\\[:A]"),
    ('Ë', "\\[:E]"),
    ('Ï', "\\[:I]"),
    ('Ö', "\\[:O]"),
    ('Ü', "\\[:U]"),
    ('Ÿ', "\\[:Y]"),
    ('ä', "\\[:a]"),
    ('ë', "\\[:e]"),
    ('ï', "\\[:i]"),
    ('ö', "\\[:o]"),
    ('ü', "\\[:u]"),
    ('ÿ', "\\[:y]"),
    ('Â', "\\[^A]"),
    ('Ê', "\\[^E]"),
    ('Î', "\\[^I]"),
    ('Ô', "\\[^O]"),
    ('Û', "\\[^U]"),
    ('â', "\\[^a]"),
    ('ê', "\\[^e]"),
    ('î', "\\[^i]"),
    ('ô', "\\[^o]"),
    ('û', "\\[^u]"),
    ('À', "\\[`A]"),
    ('È', "\\[`E]"),
    ('Ì', "\\[`I]"),
    ('Ò', "\\[`O]"),
    ('Ù', "\\[`U]"),
    ('à', "\\[`a]"),
    ('è', "\\[`e]"),
    ('ì', "\\[`i]"),
    ('ò', "\\[`o]"),
    ('ù', "\\[`u]"),
    ('Ã', "\\[~A]"),
    ('Ñ', "\\[~N]"),
    ('Õ', "\\[~O]"),
    ('ã', "\\[~a]"),
    ('ñ', "\\[~n]"),
    ('õ', "\\[~o]"),
    ('Š', "\\[vS]"),
    ('š', "\\[vs]"),
    ('Ž', "\\[vZ]"),
    ('ž', "\\[vz]"),
    ('Ç', "\\[,C]"),
    ('ç', "\\[,c]"),
    ('Å', "\\[oA]"),
    ('å', "\\[oa]"),
    // Accents
    ('˝', "\\[a\"]"),
    ('¯', "\\[a-]"),
    ('˙', "\\[a.]"),
    ('´', "\\´"),
    ('`', "\\`"),
    ('˘', "\\[ab]"),
    ('¸', "\\[ac]"),
    ('¨', "\\[ad]"),
    ('ˇ', "\\[ah]"),
    ('˚', "\\[ao]"),
    ('˛', "\\[ho]"),
    ('^', "\\(ha"),
    ('~', "\\[ti]"),
    // Quotes
    ('„', "\\[Bq]"),
    ('‚', "\\[bq]"),
    ('“', "\\[lq]"),
    ('”', "\\[rq]"),
    ('‘', "\\[oq]"),
    ('’', "\\[cq]"),
    ('\'', "\\(aq"),
    ('"', "\\[dq]"),
    ('«', "\\[Fo]"),
    ('»', "\\[Fc]"),
    ('‹', "\\[fo]"),
    ('›', "\\[fc]"),
    // Punctuation
    ('.', "\\."),
    ('¡', "\\[r!]"),
    ('¿', "\\[r?]"),
    ('—', "\\[em]"),
    ('–', "\\[en]"),
    ('‐', "\\[hy]"),
    // Brackets
    ('[', "\\[lB]"),
    (']', "\\[rB]"),
    ('{', "\\[lC]"),
    ('}', "\\[rC]"),
    ('⟨', "\\[la]"),
    ('⟩', "\\[ra]"),
    ('⎡', "\\[bracketlefttp]"),
    ('⎣', "\\[bracketleftbt]"),
    ('⎢', "\\[bracketleftex]"),
    ('⎤', "\\[bracketrighttp]"),
    ('⎦', "\\[bracketrightbt]"),
    ('⎥', "\\[bracketrightex]"),
    ('╭', "\\[lt]"),
    ('⎧', "\\[bracelefttp]"),
    ('┥', "\\[lk]"),
    ('⎨', "\\[braceleftmid]"),
    ('╰', "\\[lb]"),
    ('⎩', "\\[braceleftbt]"),
    ('╮', "\\[rt]"),
    ('⎫', "\\[bracerighttp]"),
    ('┝', "\\[rk]"),
    ('⎬', "\\[bracerightmid]"),
    ('╯', "\\[rb]"),
    ('⎭', "\\[bracerightbt]"),
    ('⎪', "\\[bracerightex]"),
    ('⎛', "\\[parenlefttp]"),
    ('⎝', "\\[parenleftbt]"),
    ('⎜', "\\[parenleftex]"),
    ('⎞', "\\[parenrighttp]"),
    ('⎠', "\\[parenrightbt]"),
    ('⎟', "\\[parenrightex]"),
    // Arrows
    ('←', "\\[<-]"),
    ('→', "\\[->]"),
    ('↔', "\\[<>]"),
    ('↓', "\\[da]"),
    ('↑', "\\[ua]"),
    ('↕', "\\[va]"),
    ('⇐', "\\[lA]"),
    ('⇒', "\\[rA]"),
    ('⇔', "\\[hA]"),
    ('⇓', "\\[dA]"),
    ('⇑', "\\[uA]"),
    ('⇕', "\\[vA]"),
    ('⎯', "\\[an]"),
    // Lines
    ('│', "\\[br]"),
    ('‾', "\\[rn]"),
    ('_', "\\[ru]"),
    ('¦', "\\[bb]"),
    ('/', "\\[sl]"),
    ('\\', "\\e"),
    // Text markers
    ('○', "\\[ci]"),
    ('‡', "\\[dd]"),
    ('†', "\\[dg]"),
    ('◊', "\\[lz]"),
    ('□', "\\[sq]"),
    ('¶', "\\[ps]"),
    ('§', "\\[sc]"),
    ('☜', "\\[lh]"),
    ('☞', "\\[rh]"),
    ('@', "\\[at]"),
    ('#', "\\[sh]"),
    ('↵', "\\[CR]"),
    ('✓', "\\[OK]"),
    // Legal symbols
    ('©', "\\[co]"),
    ('®', "\\[rg]"),
    ('™', "\\[tm]"),
    // Currency symbols
    ('$', "\\[Do]"),
    ('¢', "\\[ct]"),
    ('€', "\\[Eu]"),
    ('¥', "\\[Ye]"),
    ('£', "\\[Po]"),
    ('¤', "\\[Cs]"),
    ('ƒ', "\\[Fn]"),
    // Units
    ('°', "\\[de]"),
    ('‰', "\\[%0]"),
    ('′', "\\[fm]"),
    ('″', "\\[sd]"),
    ('µ', "\\[mc]"),
    ('ª', "\\[Of]"),
    ('º', "\\[Om]"),
    // Logical symbols
    ('∧', "\\[AN]"),
    ('∨', "\\[OR]"),
    ('¬', "\\[tno]"),
    ('∃', "\\[te]"),
    ('∀', "\\[fa]"),
    ('∋', "\\[st]"),
    ('∴', "\\[tf]"),
    ('|', "\\[or]"),
    // Mathematical symbols
    ('½', "\\[12]"),
    ('¼', "\\[14]"),
    ('¾', "\\[34]"),
    ('⅛', "\\[18]"),
    ('⅜', "\\[38]"),
    ('⅝', "\\[58]"),
    ('⅞', "\\[78]"),
    ('¹', "\\[S1]"),
    ('²', "\\[S2]"),
    ('³', "\\[S3]"),
    ('+', "\\[pl]"),
    ('-', "\\-"),
    ('−', "\\[mi]"),
    ('∓', "\\[-+]"),
    ('±', "\\[t+-]"),
    ('·', "\\[pc]"),
    ('⋅', "\\[md]"),
    ('×', "\\[tmu]"),
    ('⊗', "\\[c*]"),
    ('⊕', "\\[c+]"),
    ('÷', "\\[tdi]"),
    ('⁄', "\\[f/]"),
    ('∗', "\\[**]"),
    ('≤', "\\[<=]"),
    ('≥', "\\[>=]"),
    ('≪', "\\[<<]"),
    ('≫', "\\[>>]"),
    ('=', "\\[eq]"),
    ('≠', "\\[!=]"),
    ('≡', "\\[==]"),
    ('≢', "\\[ne]"),
    ('≅', "\\[=~]"),
    ('≃', "\\[|=]"),
    ('∼', "\\[ap]"),
    ('≈', "\\[~=]"),
    ('∝', "\\[pt]"),
    ('∅', "\\[es]"),
    ('∈', "\\[mo]"),
    ('∉', "\\[nm]"),
    ('⊂', "\\[sb]"),
    ('⊄', "\\[nb]"),
    ('⊃', "\\[sp]"),
    ('⊅', "\\[nc]"),
    ('⊆', "\\[ib]"),
    ('⊇', "\\[ip]"),
    ('∩', "\\[ca]"),
    ('∪', "\\[cu]"),
    ('∠', "\\[/_]"),
    ('⊥', "\\[pp]"),
    ('∫', "\\[integral]"),
    ('∑', "\\[sum]"),
    ('∏', "\\[product]"),
    ('∐', "\\[coproduct]"),
    ('∇', "\\[gr]"),
    ('√', "\\[sqrt]"),
    ('⌈', "\\[lc]"),
    ('⌉', "\\[rc]"),
    ('⌊', "\\[lf]"),
    ('⌋', "\\[rf]"),
    ('∞', "\\[if]"),
    ('ℵ', "\\[Ah]"),
    ('ℑ', "\\[Im]"),
    ('ℜ', "\\[Re]"),
    ('℘', "\\[wp]"),
    ('∂', "\\[pd]"),
    ('ℏ', "\\[hbar]"),
    // Greek glyphs
    ('Α', "\\[*A]"),
    ('Β', "\\[*B]"),
    ('Γ', "\\[*G]"),
    ('Δ', "\\[*D]"),
    ('Ε', "\\[*E]"),
    ('Ζ', "\\[*Z]"),
    ('Η', "\\[*Y]"),
    ('Θ', "\\[*H]"),
    ('Ι', "\\[*I]"),
    ('Κ', "\\[*K]"),
    ('Λ', "\\[*L]"),
    ('Μ', "\\[*M]"),
    ('Ν', "\\[*N]"),
    ('Ξ', "\\[*C]"),
    ('Ο', "\\[*O]"),
    ('Π', "\\[*P]"),
    ('Ρ', "\\[*R]"),
    ('Σ', "\\[*S]"),
    ('Τ', "\\[*T]"),
    ('Υ', "\\[*U]"),
    ('Φ', "\\[*F]"),
    ('Χ', "\\[*X]"),
    ('Ψ', "\\[*Q]"),
    ('Ω', "\\[*W]"),
    ('α', "\\[*a]"),
    ('β', "\\[*b]"),
    ('γ', "\\[*g]"),
    ('δ', "\\[*d]"),
    ('ε', "\\[*e]"),
    ('ζ', "\\[*z]"),
    ('η', "\\[*y]"),
    ('θ', "\\[*h]"),
    ('ι', "\\[*i]"),
    ('κ', "\\[*k]"),
    ('λ', "\\[*l]"),
    ('μ', "\\[*m]"),
    ('ν', "\\[*n]"),
    ('ξ', "\\[*c]"),
    ('ο', "\\[*o]"),
    ('π', "\\[*p]"),
    ('ρ', "\\[*r]"),
    ('ς', "\\[ts]"),
    ('σ', "\\[*s]"),
    ('τ', "\\[*t]"),
    ('υ', "\\[*u]"),
    ('ϕ', "\\[*f]"),
    ('χ', "\\[*x]"),
    ('ψ', "\\[*q]"),
    ('ω', "\\[*w]"),
    ('ϑ', "\\[+h]"),
    ('φ', "\\[+f]"),
    ('ϖ', "\\[+p]"),
    ('ϵ', "\\[+e]"),
    // Card symbols
    ('♣', "\\[CL]"),
    ('♠', "\\[SP]"),
    ('♥', "\\[HE]"),
    ('♡', "\\[u2661]"),
    ('♦', "\\[DI]"),
    ('♢', "\\[u2662]"),
];

static GLYPH_MAP: LazyLock<HashMap<char, &'static str>> =
    LazyLock::new(|| GLYPHS.iter().copied().collect());

/// Replaces every mapped code point in `text` with its roff escape sequence.
///
/// Unmapped characters, including newlines, pass through unchanged.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match GLYPH_MAP.get(&ch) {
            Some(glyph) => out.push_str(glyph),
            None => out.push(ch),
        }
    }
    out
}
