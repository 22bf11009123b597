use crate::domain::coin::Coin;
use crate::error::Result;
use std::io::Read;

/// Reads coin inventory rows (`denomination, quantity`) from a CSV source.
///
/// Denominations outside the legal coin set fail to deserialize, so they are
/// rejected here and never reach the coin ledger.
pub struct CoinReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CoinReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: super::reader_builder().from_reader(source),
        }
    }

    pub fn coins(self) -> impl Iterator<Item = Result<Coin>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Denomination;

    #[test]
    fn test_reader_valid_stream() {
        let data = "denomination, quantity\n2.00, 5\n0.05, 20\n1, 3";
        let coins: Vec<Coin> = CoinReader::new(data.as_bytes())
            .coins()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(
            coins,
            vec![
                Coin::new(Denomination::TwoPounds, 5),
                Coin::new(Denomination::FivePence, 20),
                Coin::new(Denomination::OnePound, 3),
            ]
        );
    }

    #[test]
    fn test_reader_rejects_illegal_denomination() {
        let data = "denomination, quantity\n0.03, 5\n99999999999999999999999999999, 1\n0.10, 1";
        let results: Vec<Result<Coin>> = CoinReader::new(data.as_bytes()).coins().collect();

        assert!(results[0].is_err());
        assert!(results[1].is_err());
        assert_eq!(
            results[2].as_ref().unwrap(),
            &Coin::new(Denomination::TenPence, 1)
        );
    }
}
