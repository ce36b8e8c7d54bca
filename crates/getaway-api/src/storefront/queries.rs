// GraphQL documents sent to the storefront.
//
// Fragments are spliced in with `concat!`, so they are macros rather than
// consts. Every operation declares the optional `$country` / `$language`
// pair consumed by `@inContext`; sending them as null leaves the shop's
// default market in effect.

macro_rules! product_item_fragment {
    () => {
        r"
fragment ProductItem on Product {
  id
  handle
  title
  description
  featuredImage { id altText url width height }
  priceRange {
    minVariantPrice { amount currencyCode }
    maxVariantPrice { amount currencyCode }
  }
  tags
  variants(first: 1) { nodes { id } }
}
"
    };
}

macro_rules! cart_fragment {
    () => {
        r"
fragment CartFields on Cart {
  id
  checkoutUrl
  totalQuantity
  cost {
    subtotalAmount { amount currencyCode }
    totalAmount { amount currencyCode }
  }
  lines(first: 100) {
    nodes {
      id
      quantity
      attributes { key value }
      cost { totalAmount { amount currencyCode } }
      merchandise {
        ... on ProductVariant {
          id
          title
          product { title handle }
        }
      }
    }
  }
}
"
    };
}

// ── Catalog ──────────────────────────────────────────────────────────

pub const COLLECTION_PRODUCTS: &str = concat!(
    r"
query CollectionProducts($handle: String!, $first: Int!, $country: CountryCode, $language: LanguageCode)
  @inContext(country: $country, language: $language) {
  collection(handle: $handle) {
    products(first: $first) { nodes { ...ProductItem } }
  }
}
",
    product_item_fragment!()
);

pub const PRODUCTS_BY_QUERY: &str = concat!(
    r"
query ProductsByQuery($query: String!, $first: Int!, $country: CountryCode, $language: LanguageCode)
  @inContext(country: $country, language: $language) {
  products(first: $first, query: $query) { nodes { ...ProductItem } }
}
",
    product_item_fragment!()
);

pub const RECOMMENDED_PRODUCTS: &str = concat!(
    r"
query RecommendedProducts($first: Int!, $country: CountryCode, $language: LanguageCode)
  @inContext(country: $country, language: $language) {
  products(first: $first, sortKey: UPDATED_AT, reverse: true) { nodes { ...ProductItem } }
}
",
    product_item_fragment!()
);

// ── Cart ─────────────────────────────────────────────────────────────

pub const CART: &str = concat!(
    r"
query Cart($id: ID!, $country: CountryCode, $language: LanguageCode)
  @inContext(country: $country, language: $language) {
  cart(id: $id) { ...CartFields }
}
",
    cart_fragment!()
);

pub const CART_CREATE: &str = concat!(
    r"
mutation CartCreate($lines: [CartLineInput!]!, $country: CountryCode, $language: LanguageCode)
  @inContext(country: $country, language: $language) {
  cartCreate(input: { lines: $lines }) {
    cart { ...CartFields }
    userErrors { field message code }
  }
}
",
    cart_fragment!()
);

pub const CART_LINES_ADD: &str = concat!(
    r"
mutation CartLinesAdd($cartId: ID!, $lines: [CartLineInput!]!, $country: CountryCode, $language: LanguageCode)
  @inContext(country: $country, language: $language) {
  cartLinesAdd(cartId: $cartId, lines: $lines) {
    cart { ...CartFields }
    userErrors { field message code }
  }
}
",
    cart_fragment!()
);

pub const CART_LINES_REMOVE: &str = concat!(
    r"
mutation CartLinesRemove($cartId: ID!, $lineIds: [ID!]!, $country: CountryCode, $language: LanguageCode)
  @inContext(country: $country, language: $language) {
  cartLinesRemove(cartId: $cartId, lineIds: $lineIds) {
    cart { ...CartFields }
    userErrors { field message code }
  }
}
",
    cart_fragment!()
);
