use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use serde::{Deserialize, Serialize};

use crate::*;

/// Identity token printed on a card face.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Front and back art of one pair. Both sides are the same symbol unless the pair uses asymmetric art.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolPair {
    pub front: Symbol,
    pub back: Symbol,
}

impl SymbolPair {
    pub fn new(front: impl Into<Symbol>, back: impl Into<Symbol>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    pub fn identical(symbol: impl Into<Symbol>) -> Self {
        let symbol = symbol.into();
        Self {
            front: symbol.clone(),
            back: symbol,
        }
    }

    pub fn is_identical(&self) -> bool {
        self.front == self.back
    }
}

/// Validated set of symbol pairs together with the front-to-back equivalence table.
///
/// An `Alphabet` is never empty, never reuses a symbol across pairs, and always fits on one board, so board
/// generation from it cannot fail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SymbolPair>", into = "Vec<SymbolPair>")]
pub struct Alphabet {
    pairs: Vec<SymbolPair>,
    classes: HashMap<Symbol, usize>,
    equivalence: HashMap<Symbol, Symbol>,
}

impl Alphabet {
    /// Alphabet where both cards of every pair show the same symbol.
    pub fn new<I, S>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        Self::from_pairs(symbols.into_iter().map(SymbolPair::identical))
    }

    /// Alphabet where every pair has a front and a back variant.
    pub fn with_variants<I, F, B>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (F, B)>,
        F: Into<Symbol>,
        B: Into<Symbol>,
    {
        Self::from_pairs(
            pairs
                .into_iter()
                .map(|(front, back)| SymbolPair::new(front, back)),
        )
    }

    /// `count` identical pairs named `01`, `02`, ...
    pub fn numbered(count: CardCount) -> Result<Self> {
        Self::new((1..=count).map(|i| format!("{:02}", i)))
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = SymbolPair>) -> Result<Self> {
        let pairs: Vec<SymbolPair> = pairs.into_iter().collect();

        if pairs.is_empty() {
            return Err(AlphabetDefect::Empty.into());
        }
        if pairs.len() > usize::from(MAX_PAIRS) {
            return Err(AlphabetDefect::TooManySymbols.into());
        }

        let mut classes = HashMap::with_capacity(pairs.len() * 2);
        let mut equivalence = HashMap::new();
        for (class, pair) in pairs.iter().enumerate() {
            claim_symbol(&mut classes, &pair.front, class)?;
            if !pair.is_identical() {
                claim_symbol(&mut classes, &pair.back, class)?;
                equivalence.insert(pair.front.clone(), pair.back.clone());
            }
        }

        Ok(Self {
            pairs,
            classes,
            equivalence,
        })
    }

    /// Number of pairs.
    pub fn len(&self) -> CardCount {
        // bounded by MAX_PAIRS on construction
        self.pairs.len() as CardCount
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn card_count(&self) -> CardCount {
        cards_for(self.len())
    }

    pub fn pairs(&self) -> &[SymbolPair] {
        &self.pairs
    }

    /// Index of the pair `symbol` belongs to, front or back.
    pub fn class_of(&self, symbol: &Symbol) -> Option<usize> {
        self.classes.get(symbol).copied()
    }

    /// Symbol an asymmetric front variant maps to.
    pub fn equivalent_of(&self, symbol: &Symbol) -> Option<&Symbol> {
        self.equivalence.get(symbol)
    }

    /// Whether two card symbols form a pair. The equivalence table is consulted in both directions.
    pub fn is_match(&self, a: &Symbol, b: &Symbol) -> bool {
        a == b || self.equivalent_of(a) == Some(b) || self.equivalent_of(b) == Some(a)
    }

    /// Symbols of every card in pair order: front then back.
    pub fn card_symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.pairs
            .iter()
            .flat_map(|pair| [&pair.front, &pair.back])
    }
}

fn claim_symbol(classes: &mut HashMap<Symbol, usize>, symbol: &Symbol, class: usize) -> Result<()> {
    match classes.entry(symbol.clone()) {
        Entry::Occupied(_) => Err(AlphabetDefect::DuplicateSymbol.into()),
        Entry::Vacant(slot) => {
            slot.insert(class);
            Ok(())
        }
    }
}

impl TryFrom<Vec<SymbolPair>> for Alphabet {
    type Error = GameError;

    fn try_from(pairs: Vec<SymbolPair>) -> Result<Self> {
        Self::from_pairs(pairs)
    }
}

impl From<Alphabet> for Vec<SymbolPair> {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn identical_symbols_match() {
        let alphabet = Alphabet::new(["A", "B"]).unwrap();

        assert!(alphabet.is_match(&"A".into(), &"A".into()));
        assert!(!alphabet.is_match(&"A".into(), &"B".into()));
    }

    #[test]
    fn variant_symbols_match_in_both_directions() {
        let alphabet = Alphabet::with_variants([("cat", "cat-back"), ("dog", "dog")]).unwrap();

        assert!(alphabet.is_match(&"cat".into(), &"cat-back".into()));
        assert!(alphabet.is_match(&"cat-back".into(), &"cat".into()));
        assert!(!alphabet.is_match(&"cat-back".into(), &"dog".into()));
        assert_eq!(alphabet.class_of(&"cat-back".into()), Some(0));
        assert_eq!(alphabet.class_of(&"dog".into()), Some(1));
    }

    #[test]
    fn empty_alphabet_is_rejected() {
        let symbols: [&str; 0] = [];

        assert_eq!(
            Alphabet::new(symbols),
            Err(GameError::InvalidAlphabet(AlphabetDefect::Empty))
        );
    }

    #[test]
    fn symbol_reused_across_pairs_is_rejected() {
        assert_eq!(
            Alphabet::new(["A", "B", "A"]),
            Err(GameError::InvalidAlphabet(AlphabetDefect::DuplicateSymbol))
        );
        assert_eq!(
            Alphabet::with_variants([("A", "a"), ("B", "a")]),
            Err(GameError::InvalidAlphabet(AlphabetDefect::DuplicateSymbol))
        );
    }

    #[test]
    fn numbered_alphabet_pads_names() {
        let alphabet = Alphabet::numbered(10).unwrap();

        assert_eq!(alphabet.len(), 10);
        assert_eq!(alphabet.card_count(), 20);
        assert_eq!(alphabet.pairs()[0].front.as_str(), "01");
        assert_eq!(alphabet.pairs()[9].front.as_str(), "10");
    }

    #[test]
    fn deserialization_revalidates() {
        let alphabet: Alphabet =
            serde_json::from_str(r#"[{"front":"A","back":"a"},{"front":"B","back":"B"}]"#).unwrap();
        assert!(alphabet.is_match(&"a".into(), &"A".into()));

        assert!(serde_json::from_str::<Alphabet>("[]").is_err());
        assert!(
            serde_json::from_str::<Alphabet>(r#"[{"front":"A","back":"A"},{"front":"A","back":"A"}]"#)
                .is_err()
        );
    }

    #[test]
    fn card_symbols_yield_both_sides_of_each_pair() {
        let alphabet = Alphabet::with_variants([("A", "a"), ("B", "B")]).unwrap();
        let symbols: Vec<&str> = alphabet.card_symbols().map(Symbol::as_str).collect();

        assert_eq!(symbols, vec!["A", "a", "B", "B"]);
    }
}
