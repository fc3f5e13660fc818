use crate::forms::ProductFilterQuery;
use crate::models::Product;

/// Everything a front end needs to render the product screens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductState {
    pub productos: Vec<Product>,
    pub categorias: Vec<String>,
    pub producto: Option<Product>,
    pub cargando: bool,
    pub error: Option<String>,
    pub filtros: ProductFilterQuery,
}

/// The only ways [`ProductState`] changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLoading(bool),
    ReplaceList(Vec<Product>),
    ReplaceCategories(Vec<String>),
    SetCurrent(Product),
    SetError(String),
    MergeFilters(ProductFilterQuery),
    /// Prepended: the newest product goes first.
    AppendCreated(Product),
    ReplaceUpdated(Product),
    RemoveDeleted(i32),
    ClearError,
}

impl ProductState {
    fn settle(&mut self) {
        self.cargando = false;
        self.error = None;
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetLoading(cargando) => self.cargando = cargando,
            Action::ReplaceList(productos) => {
                self.productos = productos;
                self.settle();
            }
            Action::ReplaceCategories(categorias) => {
                self.categorias = categorias;
                self.settle();
            }
            Action::SetCurrent(producto) => {
                self.producto = Some(producto);
                self.settle();
            }
            Action::SetError(message) => {
                self.error = Some(message);
                self.cargando = false;
            }
            Action::MergeFilters(patch) => self.filtros.merge(patch),
            Action::AppendCreated(producto) => {
                self.productos.insert(0, producto);
                self.settle();
            }
            Action::ReplaceUpdated(producto) => {
                if let Some(slot) = self.productos.iter_mut().find(|p| p.id == producto.id) {
                    *slot = producto.clone();
                }
                if self.producto.as_ref().map_or(false, |p| p.id == producto.id) {
                    self.producto = Some(producto);
                }
                self.settle();
            }
            Action::RemoveDeleted(id) => {
                self.productos.retain(|p| p.id != id);
                self.settle();
            }
            Action::ClearError => self.error = None,
        }
    }

    /// Folds `action` into a copy of the state.
    pub fn reduce(mut self, action: Action) -> Self {
        self.apply(action);
        self
    }
}
