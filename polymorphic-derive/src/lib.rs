use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Implements `Polymorphic` for a `Debug + PartialEq + Send + Sync + 'static` type.
///
/// The expansion refers to `Polymorphic` and `TypeKey` unqualified, so both must be in scope.
#[proc_macro_derive(Polymorphic)]
pub fn derive_polymorphic(input: TokenStream) -> TokenStream {
  let input = parse_macro_input!(input as DeriveInput);
  let name = &input.ident;
  let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

  let expanded = quote! {
      impl #impl_generics Polymorphic for #name #ty_generics #where_clause {
          fn eq_polymorphic(&self, other: &dyn Polymorphic) -> bool {
              other.as_any().downcast_ref::<Self>()
                  .map_or(false, |other| self == other)
          }

          fn as_any(&self) -> &(dyn std::any::Any + Send + Sync + 'static) {
              self
          }

          fn type_key(&self) -> TypeKey {
              TypeKey::of::<Self>()
          }
      }
  };

  TokenStream::from(expanded)
}
