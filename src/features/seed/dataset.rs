/// A category to seed: name and description
pub type CategorySeed = (&'static str, &'static str);

/// A product to seed: name, category name, whole-unit price and stock
pub type ProductSeed = (&'static str, &'static str, i64, i32);

pub const MENU_CATEGORIES: &[CategorySeed] = &[
    ("Hamburguesas", "Hamburguesas clásicas y gourmet"),
    ("Pizzas", "Pizzas artesanales con ingredientes frescos"),
    ("Empanadas", "Empanadas caseras rellenas"),
    ("Parrilla", "Carnes a la parrilla y choripán"),
    ("Pastas", "Pastas frescas y salsas caseras"),
    ("Ensaladas", "Ensaladas frescas y saludables"),
    ("Bebidas", "Bebidas frías y calientes"),
    ("Postres", "Postres caseros y helados"),
];

pub const MENU_PRODUCTS: &[ProductSeed] = &[
    // Hamburguesas
    ("Hamburguesa Clásica", "Hamburguesas", 2500, 20),
    ("Hamburguesa Completa", "Hamburguesas", 3200, 15),
    ("Hamburguesa BBQ", "Hamburguesas", 3500, 12),
    // Pizzas
    ("Pizza Margherita", "Pizzas", 3200, 8),
    ("Pizza Napolitana", "Pizzas", 3800, 6),
    ("Pizza Fugazzeta", "Pizzas", 4200, 5),
    // Empanadas
    ("Empanadas de Carne", "Empanadas", 180, 50),
    ("Empanadas de Pollo", "Empanadas", 180, 40),
    ("Empanadas de Jamón y Queso", "Empanadas", 180, 30),
    ("Empanadas de Humita", "Empanadas", 200, 25),
    // Parrilla
    ("Choripán", "Parrilla", 1200, 25),
    ("Bife de Chorizo", "Parrilla", 4500, 8),
    ("Costillas BBQ", "Parrilla", 3800, 10),
    // Pastas
    ("Lomito Completo", "Pastas", 3500, 12),
    ("Ñoquis con Salsa", "Pastas", 2800, 15),
    ("Ravioles de Ricota", "Pastas", 3200, 10),
    // Ensaladas
    ("Ensalada César", "Ensaladas", 1800, 18),
    ("Ensalada Mixta", "Ensaladas", 1500, 20),
    // Bebidas
    ("Coca Cola 500ml", "Bebidas", 300, 60),
    ("Agua Mineral 500ml", "Bebidas", 200, 80),
    ("Cerveza Quilmes", "Bebidas", 400, 45),
    ("Jugo Natural", "Bebidas", 350, 30),
    // Postres
    ("Flan Casero", "Postres", 800, 15),
    ("Helado 1/4kg", "Postres", 1200, 20),
    ("Tiramisu", "Postres", 950, 12),
];
