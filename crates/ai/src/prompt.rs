use stocksense_inventory::InventoryRecord;

const TASK_FRAMING: &str = "\
You are an AI inventory planning assistant for an e-commerce retail company.
Using the inventory data below, predict short-term demand trends, flag products at risk
of overstock or stockout, and give clear restocking recommendations.";

const OUTPUT_CONTRACT: &str = "\
For each product, respond with:
- sku: the product SKU exactly as given
- riskLevel: one of low, medium, high
- recommendation: short text
- suggestedReorderQuantity: non-negative integer
- reasoning: 1-2 sentences

Reply with a valid JSON array of objects with exactly these fields:
sku, riskLevel, recommendation, suggestedReorderQuantity, reasoning.";

const NO_SALES_MARKER: &str = "no recent sales data";

/// Renders an inventory snapshot into a single instruction for the model.
///
/// Output is a pure function of the records (in the given order) and the season
/// hint: identical input yields byte-identical output. Callers must not pass an
/// empty record set.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PromptBuilder {
    /// Number of most recent sales entries rendered per record.
    sales_window: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self { sales_window: 6 }
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sales_window(mut self, sales_window: usize) -> Self {
        self.sales_window = sales_window;
        self
    }

    pub fn build(&self, records: &[InventoryRecord], season: Option<&str>) -> String {
        let products = records
            .iter()
            .map(|r| self.render_record(r))
            .collect::<Vec<_>>()
            .join("\n\n");

        let mut prompt = format!("{TASK_FRAMING}\n\n{OUTPUT_CONTRACT}\n\nINVENTORY DATA:\n{products}");

        if let Some(season) = season.map(str::trim).filter(|s| !s.is_empty()) {
            prompt.push_str(&format!(
                "\n\nAdditional context: the current season is {season}; weight seasonal demand effects where relevant."
            ));
        }

        prompt
    }

    fn render_record(&self, record: &InventoryRecord) -> String {
        let recent = record.recent_sales(self.sales_window);
        let sales = if recent.is_empty() {
            NO_SALES_MARKER.to_string()
        } else {
            recent
                .iter()
                .map(|s| format!("{}: {}", s.date.format("%Y-%m-%d"), s.quantity_sold))
                .collect::<Vec<_>>()
                .join(", ")
        };

        format!(
            "Product: {} (SKU: {})\nCategory: {}\nCurrent stock: {}\nReorder level: {}\nReorder quantity: {}\nRecent sales: {}",
            record.name,
            record.sku,
            record.category,
            record.current_stock,
            record.reorder_level,
            record.reorder_quantity,
            sales,
        )
    }
}
