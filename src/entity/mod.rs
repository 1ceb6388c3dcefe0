pub mod activity;
pub mod cart_items;
pub mod comments;
pub mod gallery_items;
pub mod order_items;
pub mod orders;
pub mod product_types;
pub mod products;
pub mod ratings;
pub mod users;

pub use activity::Entity as ActivityLog;
pub use cart_items::Entity as CartItems;
pub use comments::Entity as Comments;
pub use gallery_items::Entity as GalleryItems;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use product_types::Entity as ProductTypes;
pub use products::Entity as Products;
pub use ratings::Entity as Ratings;
pub use users::Entity as Users;
