//! Menu catalog
//!
//! The seeded house menu. Read-only: catalog management is a back-office
//! concern outside this service.

use shared::models::{Product, ProductCategory};

/// In-memory menu catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The house menu
    pub fn seeded() -> Self {
        use ProductCategory::*;

        let mut products = Vec::new();
        let menu: &[(&str, &str, ProductCategory, f64, &str, bool)] = &[
            // Aperitivos
            ("app1", "Patatas Bravas", Appetizers, 8.50, "Patatas fritas con salsa brava y alioli", true),
            ("app2", "Jamón Ibérico", Appetizers, 15.00, "Jamón ibérico de bellota cortado a mano", false),
            ("app3", "Croquetas de Jamón", Appetizers, 9.00, "Croquetas caseras de jamón serrano", false),
            ("app4", "Pulpo a la Gallega", Appetizers, 12.50, "Pulpo cocido con pimentón y aceite de oliva", false),
            // Platos Principales
            ("main1", "Paella Valenciana", Mains, 18.00, "Paella tradicional con pollo, conejo y verduras", true),
            ("main2", "Solomillo de Ternera", Mains, 22.00, "Solomillo a la plancha con salsa de vino tinto", false),
            ("main3", "Bacalao al Pil Pil", Mains, 16.50, "Bacalao confitado en aceite de oliva con ajo", false),
            ("main4", "Cordero Asado", Mains, 20.00, "Cordero lechal asado con hierbas aromáticas", false),
            // Bebidas
            ("bev1", "Sangría de la Casa", Beverages, 6.50, "Sangría casera con frutas de temporada", true),
            ("bev2", "Cerveza Estrella Galicia", Beverages, 3.50, "Cerveza gallega de barril", false),
            ("bev3", "Vino Tinto Rioja", Beverages, 4.80, "Copa de vino tinto D.O. Rioja", false),
            ("bev4", "Agua Mineral", Beverages, 2.50, "Agua mineral natural", false),
            // Postres
            ("des1", "Flan de la Abuela", Desserts, 5.50, "Flan casero con caramelo", true),
            ("des2", "Torrijas", Desserts, 6.00, "Torrijas tradicionales con canela y miel", false),
            ("des3", "Tarta de Santiago", Desserts, 5.80, "Tarta de almendra con azúcar glas", false),
            ("des4", "Crema Catalana", Desserts, 5.20, "Crema catalana con azúcar caramelizado", false),
        ];

        for (id, name, category, price, description, popular) in menu {
            products.push(Product {
                id: (*id).to_string(),
                name: (*name).to_string(),
                category: *category,
                price: *price,
                description: Some((*description).to_string()),
                popular: *popular,
            });
        }

        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn by_category(&self, category: ProductCategory) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products highlighted on the catalog grid
    pub fn popular(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.popular).collect()
    }
}
