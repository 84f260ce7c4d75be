use chrono::{Days, NaiveDate};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = SimpleRng::new(42);

    // (region, countries in that region)
    let regions: [(&str, &[&str]); 4] = [
        ("North America", &["United States", "Canada", "Mexico"]),
        ("Europe", &["Germany", "France", "United Kingdom", "Spain"]),
        ("Asia", &["Japan", "India", "China"]),
        ("South America", &["Brazil", "Argentina"]),
    ];

    // (category, products, price band)
    let catalog: [(&str, &[&str], (f64, f64)); 4] = [
        ("Electronics", &["Laptop", "Smartphone", "Headphones"], (50.0, 1500.0)),
        ("Furniture", &["Desk", "Chair", "Bookshelf"], (40.0, 600.0)),
        ("Clothing", &["Jacket", "Sneakers", "T-Shirt"], (10.0, 120.0)),
        ("Books", &["Novel", "Atlas", "Cookbook"], (5.0, 60.0)),
    ];

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    let n_rows = 1000;

    let mut writer = csv::Writer::from_path("sales_data.csv")?;
    writer.write_record([
        "Date",
        "Region",
        "Country",
        "ProductCategory",
        "Product",
        "UnitsSold",
        "UnitPrice",
        "TotalSales",
    ])?;

    for _ in 0..n_rows {
        let date = start
            .checked_add_days(Days::new(rng.range(0, 365)))
            .expect("date within 2024-2025");
        let (region, countries) = *rng.pick(&regions);
        let country = rng.pick(countries);
        let (category, products, (price_lo, price_hi)) = *rng.pick(&catalog);
        let product = rng.pick(products);

        let units = rng.range(1, 20);
        // Round price to cents so TotalSales = UnitsSold * UnitPrice is exact.
        let unit_price =
            ((price_lo + rng.next_f64() * (price_hi - price_lo)) * 100.0).round() / 100.0;
        let total_sales = units as f64 * unit_price;

        writer.write_record([
            date.format("%Y-%m-%d").to_string(),
            region.to_string(),
            country.to_string(),
            category.to_string(),
            product.to_string(),
            units.to_string(),
            format!("{unit_price:.2}"),
            format!("{total_sales:.2}"),
        ])?;
    }

    writer.flush()?;
    println!("Wrote {n_rows} rows to sales_data.csv");
    Ok(())
}
